/// What the connection initializer does when the attempt fails.
///
/// `Continue` keeps the process running on nothing but a log line, which is
/// the historical behavior. `Exit` turns the same failure into a nonzero
/// process exit for deployments that would rather crash than limp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Continue,
    Exit,
}

impl FailurePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "continue" => Some(Self::Continue),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub on_db_failure: FailurePolicy,
}

impl Settings {
    /// Read settings from the environment. The connection URI itself is not
    /// cached here; the db layer reads it when the attempt actually runs.
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let on_db_failure = std::env::var("DB_ON_FAILURE")
            .ok()
            .and_then(|v| FailurePolicy::parse(&v))
            .unwrap_or_default();

        Self {
            bind_addr,
            on_db_failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_continue() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Continue);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(FailurePolicy::parse("continue"), Some(FailurePolicy::Continue));
        assert_eq!(FailurePolicy::parse("exit"), Some(FailurePolicy::Exit));
        assert_eq!(FailurePolicy::parse("EXIT"), Some(FailurePolicy::Exit));
    }

    #[test]
    fn test_parse_policy_rejects_unknown() {
        assert_eq!(FailurePolicy::parse("retry"), None);
        assert_eq!(FailurePolicy::parse(""), None);
    }
}
