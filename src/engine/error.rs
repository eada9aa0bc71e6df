use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Fatal initialization failures. Any of these halts startup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not get a graphics context: {0}")]
    ContextUnavailable(String),

    #[error("Error in {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Link error in program: {log}")]
    ProgramLink { log: String },

    #[error("failed to create {what}: {message}")]
    Resource { what: &'static str, message: String },
}

impl RenderError {
    pub fn resource(what: &'static str) -> impl FnOnce(String) -> Self {
        move |message| RenderError::Resource { what, message }
    }

    /// The one-line report shown to whoever launched the viewer.
    pub fn user_message(&self) -> String {
        match self {
            RenderError::ContextUnavailable(_) => "Sorry, could not get a graphics context.".to_string(),
            other => format!("Could not initialize the graphics context: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_message_carries_driver_log() {
        let err = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error".to_string(),
        };
        assert_eq!(err.to_string(), "Error in fragment shader: 0:3(1): error: syntax error");
    }

    #[test]
    fn user_message_hides_context_details() {
        let err = RenderError::ContextUnavailable("no EGL display".to_string());
        assert_eq!(err.user_message(), "Sorry, could not get a graphics context.");
    }

    #[test]
    fn user_message_wraps_link_errors() {
        let err = RenderError::ProgramLink { log: "varying v_color not written".to_string() };
        assert_eq!(
            err.user_message(),
            "Could not initialize the graphics context: Link error in program: varying v_color not written"
        );
    }

    #[test]
    fn resource_helper_names_the_object() {
        let err = RenderError::resource("index buffer")("out of memory".to_string());
        assert_eq!(err.to_string(), "failed to create index buffer: out of memory");
    }
}
