//! # Domain Services
//!
//! 複数のエンティティにまたがるビジネスルール

pub mod marking;
pub mod selection;

pub use marking::MarkingScheme;
pub use selection::SelectionService;
