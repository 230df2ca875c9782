//! Integration tests for gchanges-drive
//!
//! Uses wiremock to simulate the Drive v2 API and verifies the change feed,
//! file handle lookup and content extraction.

mod common;

mod test_changes;
mod test_content;
