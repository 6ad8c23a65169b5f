// SPDX-License-Identifier: Apache-2.0

pub(crate) mod docs;
pub(crate) mod handlers;
pub(crate) mod health;
pub(crate) mod request_context;
pub(crate) mod request_tracing;
pub(crate) mod response_contract;
