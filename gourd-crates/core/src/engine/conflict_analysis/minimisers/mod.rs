mod recursive_minimiser;

pub(crate) use recursive_minimiser::RecursiveMinimiser;
