use std::panic::Location;

/// Converts foreign errors into `anyhow::Error`, tagged with the call site.
pub trait DefaultContext<T> {
    fn dc(self) -> anyhow::Result<T>;
}

impl<T, E> DefaultContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn dc(self) -> anyhow::Result<T> {
        let caller = Location::caller();
        self.map_err(|e| {
            anyhow::Error::new(e).context(format!("at {}:{}", caller.file(), caller.line()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_points_at_caller() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk on fire",
        ));
        let err = res.dc().unwrap_err();
        assert!(err.to_string().contains("app_errors.rs"));
        assert_eq!(err.root_cause().to_string(), "disk on fire");
    }
}
