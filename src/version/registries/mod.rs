//! Registry implementations for fetching WordPress releases

pub mod wordpress_org;

pub use wordpress_org::WordPressOrgRegistry;
