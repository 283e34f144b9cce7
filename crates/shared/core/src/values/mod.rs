/// Timestamp of a reading
///
/// Epoch milliseconds when taken from the clock; producers may use any
/// numeric scale as long as it is consistent per identifier.
/// NaN when the source field is not numeric.
pub type Timestamp = f64;

/// Numeric magnitude carried by a reading
pub type Measure = f64;

/// Per-stream partition key, state is tracked independently per identifier
pub type Identifier = String;
