use std::{collections::BTreeMap, fmt, io, sync::Arc};

#[derive(Debug, Clone)]
pub struct RigError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<RigCause>,
}

#[derive(Debug, Clone)]
pub enum RigCause {
    Rig(Box<RigError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl RigError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_rig(mut self, cause: RigError) -> Self {
        self.causes.push(RigCause::Rig(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(RigCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for RigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            RigCause::Rig(e) => Some(e.as_ref() as &dyn std::error::Error),
            RigCause::Std(e) => Some(e.as_ref()),
        })
    }
}

impl From<io::Error> for RigError {
    fn from(err: io::Error) -> Self {
        RigError::new("io-error").push_std(err)
    }
}

impl From<serde_json::Error> for RigError {
    fn from(err: serde_json::Error) -> Self {
        RigError::new("json-error")
            .with_arg("line", err.line())
            .push_std(err)
    }
}

impl From<confy::ConfyError> for RigError {
    fn from(err: confy::ConfyError) -> Self {
        RigError::new("confy-error").push_std(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_lists_args_in_key_order() {
        let err = RigError::new("unknown-joint")
            .with_arg("name", "paw")
            .with_arg("hint", "snake_case");
        assert_eq!(err.to_string(), "unknown-joint(hint=snake_case, name=paw)");
    }

    #[test]
    fn source_walks_first_cause() {
        let inner = RigError::new("invalid-parent").with_arg("bone", "tail");
        let outer = RigError::new("skeleton").push_rig(inner);
        let source = outer.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("invalid-parent(bone=tail)"));
    }
}
