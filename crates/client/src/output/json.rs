//! JSON output formatting.

/// Format a value as compact JSON, one document per line.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoochat_core::user::User;

    #[test]
    fn user_json_omits_password_hash() {
        let user = User::new("otter@zoo.test", "Otter", "$argon2id$secret");
        let json = format_json(&user);

        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains('\n'));
    }
}
