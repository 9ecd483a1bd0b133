pub mod citation;
pub mod policy_document;
