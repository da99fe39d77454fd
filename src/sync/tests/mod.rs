//! Unit tests for the dist-git synchronization service.

mod support;
