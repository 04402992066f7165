//! Error types for mesh welding.

/// Errors that can occur while feeding corners to a welder.
///
/// Both variants are caller-contract violations and are fatal for the
/// current mesh's conversion; a fresh welder is required afterwards.
#[derive(Debug)]
pub enum WeldError {
    /// A corner referenced a source vertex slot outside the mesh.
    OriginalIndexOutOfRange {
        /// The offending source vertex index.
        original_index: u32,
        /// Number of vertices in the source mesh.
        source_vertex_count: u32,
    },
    /// A corner's attribute bundle does not match the mesh's declared
    /// channel shape (an optional channel present on some corners only).
    ChannelMismatch {
        /// Source vertex index of the offending corner.
        original_index: u32,
    },
}

impl std::fmt::Display for WeldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OriginalIndexOutOfRange {
                original_index,
                source_vertex_count,
            } => {
                write!(
                    f,
                    "original vertex index {original_index} out of range (source mesh has {source_vertex_count} vertices)"
                )
            }
            Self::ChannelMismatch { original_index } => {
                write!(
                    f,
                    "corner at original vertex {original_index} does not match the mesh's declared attribute channels"
                )
            }
        }
    }
}

impl std::error::Error for WeldError {}
