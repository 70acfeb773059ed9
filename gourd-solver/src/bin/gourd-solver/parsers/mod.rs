pub(crate) mod dimacs;
