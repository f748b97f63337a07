// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! switchboard-codec: leaf codecs shared by the event dispatcher
//!
//! This crate provides:
//! - `HashedId` - a string identity compared by its 32-bit checksum
//! - `ByteBuffer` - a growable byte store with independent read/write cursors

pub mod buffer;
pub mod hash;

pub use buffer::{BufferError, ByteBuffer, Scalar};
pub use hash::{memcrc, HashedId};
