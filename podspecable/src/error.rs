use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to decode {type_name} from JSON, error: {source}"))]
    DecodeJson { type_name: &'static str, source: serde_json::Error },

    #[snafu(display("Failed to decode {type_name} from YAML, error: {source}"))]
    DecodeYaml { type_name: &'static str, source: serde_yaml::Error },

    #[snafu(display("Failed to encode {type_name} to JSON, error: {source}"))]
    EncodeJson { type_name: &'static str, source: serde_json::Error },

    #[snafu(display("Failed to encode {type_name} to YAML, error: {source}"))]
    EncodeYaml { type_name: &'static str, source: serde_yaml::Error },

    #[snafu(display("Kind {kind} is already registered"))]
    DuplicateKind { kind: String },

    #[snafu(display("Kind {kind} is not registered"))]
    UnknownKind { kind: String },

    #[snafu(display("Shape {shape} is already registered"))]
    DuplicateShape { shape: &'static str },

    #[snafu(display("Shape {shape} is not registered"))]
    UnknownShape { shape: String },

    #[snafu(display(
        "{type_name} does not implement the duck type {shape}, the following fields were lost: \
         {}",
        lost_fields.join(", ")
    ))]
    ShapeNotImplemented { type_name: &'static str, shape: &'static str, lost_fields: Vec<String> },

    #[snafu(display("Failed to list resources from {resource_url}, error: {source}"))]
    ListWorkloads {
        resource_url: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("{resource_url} returned continue token {token} twice"))]
    RepeatedContinueToken { resource_url: String, token: String },
}

impl Error {
    /// Returns `true` when a document could not be decoded, either because it
    /// is not well-formed or because one of its fields has an incompatible
    /// structure.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(self, Self::DecodeJson { .. } | Self::DecodeYaml { .. })
    }
}
