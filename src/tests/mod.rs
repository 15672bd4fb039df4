//! Unit tests with access to the histogram's internal geometry.

mod helpers;
