pub mod model;

pub use model::{NewPerson, Person, PhonebookInfo};
