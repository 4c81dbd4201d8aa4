// Search indexing: tantivy schema and index handle, the fingerprint
// cache, and the corpus-to-index synchronizer built on both.

pub mod fingerprint;
pub mod schema;
pub mod search;
pub mod sync;

// Re-exports
pub use fingerprint::{recipe_digest, Fingerprint, FingerprintCache, DIGEST_LEN};
pub use schema::RecipeSchema;
pub use search::{SearchHit, SearchIndex};
pub use sync::{synchronize, SyncReport};
