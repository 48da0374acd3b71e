//! Unit tests mirroring the source tree

mod spatial;
