use snafu::Snafu;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum StateError {
    #[snafu(display("screen '{name}' is not registered"))]
    ScreenNotFound { stage: &'static str, name: String },
}

pub type StateResult<T> = Result<T, StateError>;
