use snafu::Snafu;

/// Failures on the way from a submit to a decoded reply.
///
/// Every variant is shown to the user as the same generic connection error;
/// the distinction only survives in logs.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum WidgetError {
    #[snafu(display("could not reach chat endpoint '{endpoint}' on `{stage}`: {message}"))]
    Connect {
        stage: &'static str,
        endpoint: String,
        message: String,
    },
    #[snafu(display("failed to read reply body from '{endpoint}' on `{stage}`: {message}"))]
    ReadBody {
        stage: &'static str,
        endpoint: String,
        message: String,
    },
    #[snafu(display("chat reply is not valid JSON on `{stage}`: {source}"))]
    MalformedReply {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("chat reply was JSON null on `{stage}`"))]
    NullReply { stage: &'static str },
}

pub type WidgetResult<T> = Result<T, WidgetError>;
