/// Identity of the running forwarder, captured once per invocation.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub function_version: String,
    pub invoked_function_arn: String,
    pub memory_limit_in_mb: i32,
}

impl From<&lambda_runtime::Context> for InvocationContext {
    fn from(context: &lambda_runtime::Context) -> Self {
        InvocationContext {
            request_id: context.request_id.clone(),
            function_name: context.env_config.function_name.clone(),
            function_version: context.env_config.version.clone(),
            invoked_function_arn: context.invoked_function_arn.clone(),
            memory_limit_in_mb: context.env_config.memory,
        }
    }
}
