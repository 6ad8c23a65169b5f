// SPDX-License-Identifier: Apache-2.0

pub(crate) mod allowed_hosts;
pub(crate) mod request_tracing;
