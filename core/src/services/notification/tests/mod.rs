//! Unit tests for the notification flows


mod announcement_tests;
