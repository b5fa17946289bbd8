mod client;
pub mod wire;

pub use client::WebhookClient;

#[cfg(test)]
pub(crate) use client::tests as test_support;
