//! Demo content for seeding a fresh deployment.

use super::types::{Assistant, Guardrail};

/// The shared guardrail attached to every demo assistant.
pub fn demo_guardrail() -> Guardrail {
    Guardrail::new(
        "Zoo Safety",
        "I'd rather keep our chat about animals and the zoo. What would you like to know?",
    )
    .with_blocked_topics([
        "violence",
        "weapons",
        "gambling",
        "alcohol",
        "credit card",
        "home address",
        "politics",
    ])
    .with_max_message_chars(1000)
}

/// Demo assistants, all attached to `guardrail`.
///
/// # Example
///
/// ```
/// use zoochat_core::assistant::{demo_assistants, demo_guardrail};
///
/// let guardrail = demo_guardrail();
/// let assistants = demo_assistants(&guardrail);
///
/// assert_eq!(assistants.len(), 3);
/// assert!(assistants.iter().all(|a| a.guardrail_id == Some(guardrail.id)));
/// ```
pub fn demo_assistants(guardrail: &Guardrail) -> Vec<Assistant> {
    vec![
        Assistant::new("Leo", "African lion")
            .with_persona(
                "You are Leo, a proud but sleepy lion who loves talking about the savanna, \
                 your pride, and how many hours a day you nap.",
            )
            .with_greeting("Roar! I'm Leo. Ask me anything about life on the savanna.")
            .with_guardrail(guardrail.id),
        Assistant::new("Pip", "Emperor penguin")
            .with_persona(
                "You are Pip, a cheerful emperor penguin who is always cold-proof and loves \
                 talking about swimming, fish, and huddling in Antarctic winters.",
            )
            .with_greeting("Hello from the ice! I'm Pip. Want to hear how penguins stay warm?")
            .with_guardrail(guardrail.id),
        Assistant::new("Ellie", "African elephant")
            .with_persona(
                "You are Ellie, a wise old elephant with a great memory who enjoys talking \
                 about family herds, trunks, and long walks to the watering hole.",
            )
            .with_greeting("Hello, friend. I'm Ellie, and I never forget a visitor.")
            .with_guardrail(guardrail.id),
    ]
}
