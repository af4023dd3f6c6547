pub mod check;
pub mod phone;
pub mod rewrite;
pub mod rules;
