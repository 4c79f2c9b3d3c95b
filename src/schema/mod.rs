// Schema contract and ingestion validation
//
// The input table must carry the fifteen fields of the ad-performance contract.
// Divergence is classified into missing columns, extra columns and near-miss
// spellings (same normalized name, different exact name). The drift mode
// decides whether missing or near-miss drift fails a load; severe nulls and
// unparseable dates always fail.
//
// Validation order:
// 1. Missing columns short-circuit into drift detection.
// 2. Extra columns are noted, never fatal.
// 3. Any column more than 50% null fails.
// 4. A timestamp column that is 100% unparseable fails.
// 5. Drift detection runs again for the near-miss-only path.
// 6. A validated note summarizes the load.

mod contract;
mod drift;
mod validator;

pub use contract::{field, FieldKind, SchemaContract, CONTRACT_FIELDS};
pub use drift::{normalize_name, DriftMode, DriftReport, NearMiss};
pub use validator::{IngestionValidator, Validation, ValidationInput, ValidationNote};
