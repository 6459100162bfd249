use std::fmt;
use std::io;

/// Errors raised while loading or validating a scene.
///
/// The tracer itself never fails; everything that can go wrong is caught here,
/// before a scene is handed to it.
#[derive(Debug)]
pub enum SceneError {
    /// The scene file could not be read.
    Io(io::Error),

    /// The scene file is not valid scene JSON.
    Json(serde_json::Error),

    /// A line of a text scene could not be parsed. Lines are one-based.
    Parse { line: usize, message: String },

    /// A required directive (e.g. `NEAR` or `RES`) never appeared.
    MissingDirective(&'static str),

    /// A sphere has a zero or non-finite scale component.
    DegenerateScale(String),

    /// A sphere or light carries a non-finite number.
    NonFinite(String),

    /// The requested image has no pixels.
    EmptyImage,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "could not read scene: {}", e),
            SceneError::Json(e) => write!(f, "invalid scene JSON: {}", e),
            SceneError::Parse { line, message } =>
                write!(f, "line {}: {}", line, message),
            SceneError::MissingDirective(tag) =>
                write!(f, "missing required directive {}", tag),
            SceneError::DegenerateScale(name) =>
                write!(f, "sphere {} has a zero or non-finite scale", name),
            SceneError::NonFinite(name) =>
                write!(f, "{} has a non-finite value", name),
            SceneError::EmptyImage =>
                write!(f, "resolution must be at least 1x1"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> SceneError {
        SceneError::Io(e)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> SceneError {
        SceneError::Json(e)
    }
}

#[test]
fn parse_errors_name_their_line() {
    let e = SceneError::Parse { line: 7, message: "bad float".into() };

    assert_eq!(e.to_string(), "line 7: bad float");
}
