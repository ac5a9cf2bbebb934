//! Read-only views over the ranked ledger: HTML page, PNG poster, CSV dump.

pub mod export;
pub mod html;
pub mod poster;
