//! Pipeline validation logic.

use crate::schema::{Pipeline, RasterFormatDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_pipeline(pipeline: &Pipeline) -> Result<(), ValidationError> {
    if pipeline.version == 0 || pipeline.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: pipeline.version,
        });
    }

    if pipeline.name.trim().is_empty() {
        return Err(invalid("name", "", "must not be empty"));
    }
    if pipeline
        .name
        .chars()
        .any(|c| std::path::is_separator(c) || c.is_control())
    {
        return Err(invalid(
            "name",
            &pipeline.name,
            "is used as a file stem and must not contain separators",
        ));
    }

    if pipeline.input.path.as_os_str().is_empty() {
        return Err(invalid("input.path", "", "must not be empty"));
    }

    if let RasterFormatDef::RawI16 { rows, cols } = pipeline.input.format {
        if rows == 0 || cols == 0 {
            return Err(invalid(
                "input.format",
                &format!("{rows}x{cols}"),
                "raw rasters need non-zero rows and cols",
            ));
        }
    }

    if let Some(cap) = pipeline.build.size_cap {
        if cap.max_rows == 0 || cap.max_cols == 0 {
            return Err(invalid(
                "build.size_cap",
                &format!("{}x{}", cap.max_rows, cap.max_cols),
                "a zero cap leaves an empty grid",
            ));
        }
    }

    Ok(())
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
