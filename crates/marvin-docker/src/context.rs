//! Bundled Docker build context
//!
//! The `engine-commands` directory (Dockerfile and entrypoint) is compiled
//! into the binary and packed into a tar archive on demand, which is the
//! form the daemon's build endpoint expects.

use crate::error::Result;
use rust_embed::RustEmbed;
use tracing::debug;

/// Embedded engine build context
#[derive(RustEmbed)]
#[folder = "resources/engine-commands/"]
struct EngineCommandsContext;

/// Pack the engine build context as an uncompressed tar archive
pub fn archive() -> Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());

    for file in EngineCommandsContext::iter() {
        let Some(content) = EngineCommandsContext::get(&file) else {
            continue;
        };
        let mode = if file.ends_with(".sh") { 0o755 } else { 0o644 };

        let mut header = tar::Header::new_gnu();
        header.set_size(content.data.len() as u64);
        header.set_mode(mode);
        builder.append_data(&mut header, &*file, content.data.as_ref())?;
        debug!("Added {} to build context", file);
    }

    Ok(builder.into_inner()?)
}
