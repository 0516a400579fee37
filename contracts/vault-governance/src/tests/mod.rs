pub mod events_test;
