//! Offline responder that answers from a small table of animal facts.

use async_trait::async_trait;
use zoochat_core::conversation::{topic_matches, ChatError, ChatRequest, ChatResponder};

struct SpeciesFacts {
    /// Matched as a whole word against the assistant's species.
    keyword: &'static str,
    diet: &'static str,
    habitat: &'static str,
    lifespan: &'static str,
    fun_fact: &'static str,
}

const FACTS: &[SpeciesFacts] = &[
    SpeciesFacts {
        keyword: "lion",
        diet: "I eat meat, mostly zebras, wildebeest and buffalo. My pride hunts together, and I can eat up to 40 kilograms in one meal!",
        habitat: "I live on the grassy savannas of Africa, lazing under acacia trees with my pride.",
        lifespan: "Lions live about 10 to 14 years in the wild and often past 20 in a zoo.",
        fun_fact: "My roar can be heard up to 8 kilometres away. I also sleep up to 20 hours a day!",
    },
    SpeciesFacts {
        keyword: "penguin",
        diet: "I eat fish, squid and krill, which I catch while diving deep under the ice.",
        habitat: "I live in Antarctica, on the sea ice and in the freezing Southern Ocean.",
        lifespan: "Emperor penguins live about 20 years in the wild.",
        fun_fact: "I can dive deeper than 500 metres and hold my breath for over 20 minutes!",
    },
    SpeciesFacts {
        keyword: "elephant",
        diet: "I am a herbivore. I eat grass, leaves, bark and fruit, up to 150 kilograms of food a day!",
        habitat: "I live in the savannas and forests of Africa, always close to a watering hole.",
        lifespan: "Elephants can live 60 to 70 years.",
        fun_fact: "My trunk has around 40,000 muscles. I use it to drink, smell, hug and even snorkel!",
    },
    SpeciesFacts {
        keyword: "giraffe",
        diet: "I munch leaves from tall acacia trees, using my 45-centimetre tongue.",
        habitat: "I live in the open woodlands and savannas of Africa.",
        lifespan: "Giraffes live about 25 years.",
        fun_fact: "I only need 5 to 30 minutes of sleep a day!",
    },
    SpeciesFacts {
        keyword: "tiger",
        diet: "I hunt deer and wild boar, usually alone and at night.",
        habitat: "I live in forests and grasslands across Asia.",
        lifespan: "Tigers live 10 to 15 years in the wild.",
        fun_fact: "No two tigers have the same stripes, just like your fingerprints!",
    },
];

const DIET_WORDS: &[&str] = &["eat", "eats", "food", "diet", "hungry", "meal", "hunt"];
const LIFESPAN_WORDS: &[&str] = &["how long", "old", "age", "lifespan"];
const HABITAT_WORDS: &[&str] = &["where", "habitat", "home", "live", "from"];
const FUN_WORDS: &[&str] = &["fun", "fact", "cool", "interesting", "surprise"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Diet,
    Lifespan,
    Habitat,
    FunFact,
}

fn detect_topic(message: &str) -> Option<Topic> {
    let mentions = |words: &[&str]| words.iter().any(|w| topic_matches(w, message));

    // Lifespan before habitat: "how long do you live" is about age.
    if mentions(DIET_WORDS) {
        Some(Topic::Diet)
    } else if mentions(LIFESPAN_WORDS) {
        Some(Topic::Lifespan)
    } else if mentions(HABITAT_WORDS) {
        Some(Topic::Habitat)
    } else if mentions(FUN_WORDS) {
        Some(Topic::FunFact)
    } else {
        None
    }
}

fn facts_for(species: &str) -> Option<&'static SpeciesFacts> {
    FACTS.iter().find(|f| topic_matches(f.keyword, species))
}

/// Deterministic persona replies without a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedResponder;

impl ScriptedResponder {
    fn answer(&self, request: &ChatRequest) -> String {
        let message = request.latest_user_message().unwrap_or_default();
        let facts = facts_for(&request.species);

        let body = match (detect_topic(message), facts) {
            (Some(Topic::Diet), Some(f)) => f.diet.to_string(),
            (Some(Topic::Lifespan), Some(f)) => f.lifespan.to_string(),
            (Some(Topic::Habitat), Some(f)) => f.habitat.to_string(),
            (Some(Topic::FunFact), Some(f)) => f.fun_fact.to_string(),
            (Some(_), None) => format!(
                "Great question! I'm still learning about life as a {}, ask a keeper to tell you more.",
                request.species
            ),
            (None, _) => format!(
                "I love chatting about life as a {}! Ask me what I eat, where I live, how long I live, or for a fun fact.",
                request.species
            ),
        };

        if request.is_opening() {
            format!(
                "Hi there, I'm {} the {}! {body}",
                request.assistant_name, request.species
            )
        } else {
            body
        }
    }
}

#[async_trait]
impl ChatResponder for ScriptedResponder {
    async fn respond(&self, request: &ChatRequest) -> Result<String, ChatError> {
        Ok(self.answer(request))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoochat_core::conversation::ChatMessage;

    fn request(species: &str, history: &[(&str, &str)], message: &str) -> ChatRequest {
        let mut messages = vec![ChatMessage::system("persona")];
        for (q, a) in history {
            messages.push(ChatMessage::user(*q));
            messages.push(ChatMessage::assistant(*a));
        }
        messages.push(ChatMessage::user(message));
        ChatRequest {
            assistant_name: "Leo".to_string(),
            species: species.to_string(),
            messages,
        }
    }

    #[test]
    fn topics_are_detected() {
        assert_eq!(detect_topic("What do you EAT?"), Some(Topic::Diet));
        assert_eq!(detect_topic("How long do you live?"), Some(Topic::Lifespan));
        assert_eq!(detect_topic("Where do you live?"), Some(Topic::Habitat));
        assert_eq!(detect_topic("tell me a fun fact"), Some(Topic::FunFact));
        assert_eq!(detect_topic("hello"), None);
    }

    #[test]
    fn species_lookup_uses_whole_words() {
        assert_eq!(facts_for("African lion").map(|f| f.keyword), Some("lion"));
        assert_eq!(facts_for("Emperor Penguin").map(|f| f.keyword), Some("penguin"));
        assert!(facts_for("Lionfish").is_none());
    }

    #[tokio::test]
    async fn first_turn_includes_greeting() {
        let reply = ScriptedResponder
            .respond(&request("African lion", &[], "what do you eat?"))
            .await
            .unwrap();
        assert!(reply.starts_with("Hi there, I'm Leo the African lion!"));
        assert!(reply.contains("zebras"));
    }

    #[tokio::test]
    async fn later_turns_answer_directly() {
        let reply = ScriptedResponder
            .respond(&request(
                "Emperor penguin",
                &[("hi", "Hi there!")],
                "Where is your home?",
            ))
            .await
            .unwrap();
        assert!(reply.starts_with("I live in Antarctica"));
    }

    #[tokio::test]
    async fn unknown_species_falls_back() {
        let reply = ScriptedResponder
            .respond(&request("Axolotl", &[("hi", "hello")], "what is your diet?"))
            .await
            .unwrap();
        assert!(reply.contains("life as a Axolotl"));
    }

    #[test]
    fn replies_are_deterministic() {
        let req = request("Tiger", &[], "anything");
        assert_eq!(ScriptedResponder.answer(&req), ScriptedResponder.answer(&req));
    }
}
