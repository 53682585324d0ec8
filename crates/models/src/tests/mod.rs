mod crud_tests;
mod mock_tests;
