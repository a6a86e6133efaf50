use rocket::{Request, catch, http::Status, response::content::RawHtml};
use crate::pages;

#[catch(400)]
pub fn bad_request(_req: &Request) -> RawHtml<String> {
    RawHtml(pages::render_invalid_input())
}

#[catch(404)]
pub fn not_found(req: &Request) -> RawHtml<String> {
    let message = format!("Nothing lives at {}.", req.uri().path());
    RawHtml(pages::render_error(Status::NotFound, &message))
}

#[catch(422)]
pub fn unprocessable(_req: &Request) -> RawHtml<String> {
    RawHtml(pages::render_invalid_input())
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> RawHtml<String> {
    RawHtml(pages::render_error(Status::InternalServerError, "An internal server error occurred."))
}
