//! Block-level text transforms.
//!
//! Every transform shares the same shape: `fn(&str, &Config, &mut Context) ->
//! String`, pure text in, HTML-ish text out. The list transform is the heart
//! of the crate; the other modules are default implementations of the sibling
//! transforms the item renderer recurses into, replaceable through
//! [`crate::context::Siblings`].

pub mod blockquotes;
pub mod code_blocks;
pub mod fenced_code;
pub mod headings;
pub mod html_blocks;
pub mod lists;
pub mod paragraphs;
pub mod spans;
pub mod tables;
pub mod task_lists;

pub(crate) mod utils;
