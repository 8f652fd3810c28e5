pub mod movie_handlers;
