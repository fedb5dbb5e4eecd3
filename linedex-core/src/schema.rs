//! Versioned record schema.
//!
//! Input corpora were observed in two revisions that disagree on the primary
//! color field and on the optional rolling-stock field. Rather than sniffing
//! per file, one [`SchemaVersion`] is selected per build run and every record
//! is validated against it.
//!
//! | Version | Color field    | Optional fields |
//! |---------|----------------|-----------------|
//! | `V1`    | `color`        | —               |
//! | `V2`    | `line_color_1` | `train`         |

use std::fmt;

/// Field name of the record identifier, common to all schema versions.
pub const LINE_CODE: &str = "line_code";

const V1_REQUIRED: &[&str] = &[
    LINE_CODE,
    "line_name",
    "destination",
    "company_code",
    "company",
    "service_type",
    "service",
    "color",
    "service_color",
    "builder",
];

const V2_REQUIRED: &[&str] = &[
    LINE_CODE,
    "line_name",
    "destination",
    "company_code",
    "company",
    "service_type",
    "service",
    "line_color_1",
    "service_color",
    "builder",
];

const V2_OPTIONAL: &[&str] = &["train"];

/// The record schema revision a build run validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    /// Earliest observed revision: `color`, no rolling-stock field.
    V1,
    /// Current revision: `line_color_1`, optional `train`.
    #[default]
    V2,
}

impl SchemaVersion {
    /// Fields every record must contain to enter the aggregate.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            SchemaVersion::V1 => V1_REQUIRED,
            SchemaVersion::V2 => V2_REQUIRED,
        }
    }

    /// Fields carried into the aggregate when present, skipped when absent.
    pub fn optional_fields(&self) -> &'static [&'static str] {
        match self {
            SchemaVersion::V1 => &[],
            SchemaVersion::V2 => V2_OPTIONAL,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "v1"),
            SchemaVersion::V2 => write!(f, "v2"),
        }
    }
}
