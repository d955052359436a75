//! Graph store implementations.
//!
//! | Store | Use Case |
//! |-------|----------|
//! | [`Neo4jStore`] | Default; bolt connection to a Neo4j server |
//! | [`ScriptedStore`] | Testing; no server |

mod neo4j;
mod scripted;

pub use neo4j::Neo4jStore;
pub use scripted::ScriptedStore;
