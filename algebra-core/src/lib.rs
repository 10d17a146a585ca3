pub mod monoid;
