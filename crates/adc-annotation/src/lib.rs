//! Marker attribute for ad-control provider declarations
//!
//! `#[ad_provider(name = "...", sdk = ...)]` marks a struct as the
//! implementation of one named external ad integration:
//!
//! ```ignore
//! use adc_annotation::ad_provider;
//!
//! #[ad_provider(name = "AdMob")]
//! #[derive(Default)]
//! pub struct AdMob;
//!
//! #[ad_provider(name = "Facebook", sdk = false)]
//! #[derive(Default)]
//! pub struct Facebook;
//! ```
//!
//! Fields: `name` (required, unique per generation pass) and `sdk`
//! (default true; API-only providers set it to false). Marked types must
//! implement `Default`, which the generated wrapper uses to construct them,
//! and be `Send + Sync` so wrapper instances can cross threads.
//!
//! The attribute is inert: it leaves the item untouched and carries no
//! runtime behavior. The `adc` generator scans source trees for it,
//! validates the fields, and emits the wrapper and registry modules.

use proc_macro::TokenStream;

/// Mark a struct as a provider implementation for a named integration
#[proc_macro_attribute]
pub fn ad_provider(args: TokenStream, input: TokenStream) -> TokenStream {
    // Field validation happens in the generator's scanner, which sees the
    // same tokens; the attribute itself only has to disappear cleanly.
    let _ = args;
    input
}
