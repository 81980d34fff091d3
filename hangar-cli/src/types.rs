//! Argument types shared across command modules

use anyhow::Result;
use clap::Args;
use hangar_core::domain::iteration::IterationRef;
use hangar_sync::desired::ImageSpec;

/// Selects an iteration by exactly one of its identifying keys
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct IterationTarget {
    /// Generated iteration ID
    #[arg(long)]
    pub iteration_id: Option<String>,

    /// Iteration fingerprint
    #[arg(long)]
    pub fingerprint: Option<String>,

    /// Incremental version assigned when the iteration was published
    #[arg(long = "version", value_name = "VERSION")]
    pub incremental_version: Option<u32>,
}

impl IterationTarget {
    /// The selected reference, if any key was given
    pub fn to_ref(&self) -> Option<IterationRef> {
        IterationRef::from_fields(
            self.iteration_id.as_deref().unwrap_or_default(),
            self.fingerprint.as_deref().unwrap_or_default(),
            self.incremental_version.unwrap_or_default(),
        )
    }

    /// Like [`to_ref`](Self::to_ref), for commands that need a target
    pub fn require(&self) -> Result<IterationRef> {
        self.to_ref().ok_or_else(|| {
            anyhow::anyhow!("one of --iteration-id, --fingerprint or --version is required")
        })
    }
}

/// Parse a single key=value pair
pub fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Parse an image given as region=image_id
pub fn parse_image(s: &str) -> Result<ImageSpec> {
    let (region, image_id) = parse_key_val(s)?;
    if region.is_empty() || image_id.is_empty() {
        anyhow::bail!("invalid REGION=image_id: both parts are required in `{}`", s);
    }
    Ok(ImageSpec::new(image_id, region))
}
