pub mod dispatcher;
pub mod todo_service;
