//! lexitest-corpus — Corpus and session store implementations.
//!
//! Implements the `CorpusProvider` and `SessionStore` traits from
//! `lexitest-core`: an in-memory store (the reference implementation used
//! by the CLI and tests) and a TOML corpus-file loader with validation.

pub mod loader;
pub mod memory;

pub use loader::{
    build_store, load_corpus_path, parse_corpus, parse_corpus_str, validate_corpus, write_corpus,
    CorpusDocument, ValidationWarning,
};
pub use memory::MemoryStore;
