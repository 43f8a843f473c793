pub mod invocation_context;
