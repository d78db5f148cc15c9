//! Token model for the Pascal front end
//!
//! Tokens are produced by an external scanner and arrive as an ordered,
//! possibly unbounded sequence terminated by an end-of-stream token. This
//! module defines what a token is and how the parser reads them.
//!
//! ## Key Components
//!
//! - **[`TokenId`]** - Closed classification of every token kind, with the
//!   canonical spelling of keywords, operators and punctuation
//! - **[`Token`]** - A classified token with its raw text and [`Position`](crate::utils::Position)
//! - **[`TxChannel`]** - Transactional reader that lets the parser backtrack
//!   over a forward-only source
//! - **[`TokenBuilder`]** - Lays out token streams without a scanner
//!
//! ## Transactions
//!
//! ```text
//! channel.start_tx();      // remember where we are
//! channel.read();          // consume
//! channel.rollback();      // ...or give everything back
//! channel.commit();        // ...or keep it
//! ```
//!
//! Inner commits fold into the enclosing transaction, so an outer rollback
//! always restores the channel to where the outer transaction began.

pub mod channel;
pub mod id;
pub mod token;

pub use channel::TxChannel;
pub use id::TokenId;
pub use token::{Literal, Token, TokenBuilder};
