//! Mutation documents sent to the backend

pub const SEND_VERIFICATION_EMAIL: &str = r#"
mutation SendVerificationEmail($email: String!, $isAccountVerification: Boolean!, $isLoginVerification: Boolean!) {
  sendVerificationEmail(email: $email, isAccountVerification: $isAccountVerification, isLoginVerification: $isLoginVerification) {
    success
    message
  }
}
"#;

pub const REGISTER: &str = r#"
mutation Register($code: String!, $email: String!, $firstName: String!, $lastName: String!, $password1: String!, $password2: String!, $username: String!) {
  register(code: $code, email: $email, firstName: $firstName, lastName: $lastName, password1: $password1, password2: $password2, username: $username) {
    success
    errors
  }
}
"#;

pub const LOGIN: &str = r#"
mutation Login($email: String!, $password: String, $code: String) {
  login(email: $email, password: $password, code: $code) {
    success
    errors
    token
    refreshToken
    refreshExpiresIn
  }
}
"#;

pub const PASSWORD_RESET: &str = r#"
mutation PasswordReset($code: String!, $password: String!, $confirmPassword: String!) {
  passwordReset(code: $code, password: $password, confirmPassword: $confirmPassword) {
    message
  }
}
"#;
