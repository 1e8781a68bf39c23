mod common;
mod routing;
mod session;
