//! Cross-module tests for routing, hover tracking and event emulation

mod support;
