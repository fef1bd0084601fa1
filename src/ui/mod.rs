// SPDX-License-Identifier: MPL-2.0
//! Iced views. State lives in [`crate::gallery`]; these modules only render
//! it and report what the guest did.

pub mod gallery;
