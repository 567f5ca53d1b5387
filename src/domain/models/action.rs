pub enum Action {
    SubmitMessage(String),
}
