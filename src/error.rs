use thiserror::Error;

/// Errors raised by the network core.
///
/// Configuration and state errors are recoverable: `Network::train` logs a
/// failed row and moves on to the next one instead of aborting the run, so a
/// single malformed row cannot kill a long training session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetError {
    /// A topology needs at least an input layer and an output layer.
    #[error("topology must list at least an input and an output layer")]
    TopologyTooShort,

    /// Every layer must contain at least one neuron.
    #[error("layer {index} has no neurons")]
    EmptyLayer { index: usize },

    /// The feature vector does not match the network's input width.
    #[error("expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    /// `Neuron::activate` was called before `set_inputs`.
    #[error("neuron activation was attempted with no input data")]
    InputsNotSet,

    /// `Neuron::output` was called before the output was ever computed.
    #[error("neuron output was requested before it was computed")]
    OutputNotComputed,

    /// `Network::train` was called with an epoch count below 1.
    #[error("epoch count must be at least 1")]
    InvalidEpochCount,

    /// `Network::train` was called with an empty dataset.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// A row's expected class has no matching output neuron.
    #[error("class label {label} is out of range for {classes} output neurons")]
    LabelOutOfRange { label: usize, classes: usize },
}
