mod movie_list;

pub use movie_list::MovieListView;
