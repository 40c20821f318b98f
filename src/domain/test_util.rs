use anyhow::anyhow;

/// Connectivity represents the "connected" state of a mocked driven port and provides
/// common behavior for returning an error if the port is configured to be in a disconnected state.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Return an error if connectivity is in a "disconnected" state
    pub fn blow_up_if_disconnected(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(anyhow!("could not connect to the database!")),
        }
    }
}

/// FakeImplementation stands in for a single function on a mocked trait. It records the
/// arguments of each call and hands back a preconfigured return value.
///
/// * [Args] represents the arguments passed to the function that should be captured on a call
/// * [Ret] represents the type of the function's return value
///
/// Mock ports wrap themselves in a [std::sync::Mutex] so calls can record arguments through `&self`:
///
/// ```ignore
/// impl MyPort for Mutex<FakePort> {
///     async fn do_thing(&self, id: i32) -> anyhow::Result<String> {
///         let mut locked_self = self.lock().unwrap();
///         locked_self.do_thing_result.save_arguments(id);
///         locked_self.do_thing_result.return_value_anyhow()
///     }
/// }
/// ```
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation of the FakeImplementation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Returns the list of arguments passed on every call to this FakeImplementation
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success> FakeImplementation<Args, anyhow::Result<Success>>
where
    Success: Clone,
{
    /// Set the result that should be returned when this FakeImplementation is invoked.
    /// [anyhow::Error] does not implement [Clone], so errors are stored by their message.
    pub fn set_returned_anyhow(&mut self, return_value: anyhow::Result<Success>) {
        match return_value {
            Ok(ok_result) => self.return_value = Some(Ok(ok_result)),
            Err(err) => self.return_value = Some(Err(anyhow!(format!("{}", err)))),
        }
    }

    pub fn return_value_anyhow(&self) -> anyhow::Result<Success> {
        match self.return_value {
            None => panic!("Tried to return from a function where the value wasn't set!"),
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(anyhow!(format!("{}", err))),
        }
    }
}
