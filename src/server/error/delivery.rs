use thiserror::Error;

/// A chunk of a response could not be posted to the reply channel.
///
/// Delivery stops at the first failure; chunks after `index` are abandoned.
#[derive(Error, Debug)]
#[error("Failed to deliver chunk {index} of {total}: {source}")]
pub struct DeliveryError {
    /// Zero-based index of the chunk that failed
    pub index: usize,
    /// Number of chunks the response was split into
    pub total: usize,
    /// The platform error returned by the send
    #[source]
    pub source: Box<serenity::Error>,
}
