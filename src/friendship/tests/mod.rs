//! Unit tests for the friend graph.
