//! Parsers for IQ-TREE run artefacts.
//!
//! - **IQ-TREE log**: extract the partition table (locus index, model, name) and build a
//!   [`LocusIndexMap`](crate::core::LocusIndexMap)
//!
//! ## Example
//!
//! ```rust,no_run
//! use locus_splitter::parsing::iqtree_log::parse_log_file;
//! use std::path::Path;
//!
//! let loci = parse_log_file(Path::new("loci.nex.log")).unwrap();
//! for (index, name) in loci.iter() {
//!     println!("{index}\t{name}");
//! }
//! ```

pub mod iqtree_log;
pub mod lines;
