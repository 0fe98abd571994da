//! Endpoint catalog for the backend media API.
//!
//! One constructor per backend operation; paths, methods and query shapes
//! are preserved exactly as the API expects them. All constructors are
//! pure; fallible ones only fail when a request body does not encode.

use bridge_traits::http::HttpMethod;
use core_network::endpoint::Endpoint;
use core_network::error::NetworkError;
use serde::de::DeserializeOwned;

use crate::models::{
    CreateProfileRequestDTO, MediaDTO, MediaLookup, MyListDTO, MyListRequestDTO, ProfileDTO,
    SeasonDTO, SectionDTO, SignInRequestDTO, SignUpRequestDTO, UpdateUserRequestDTO,
    UserResponseDTO,
};

/// Every backend endpoint speaks JSON; the content-type travels on each
/// request.
fn json_endpoint<R: DeserializeOwned + 'static>(path: &str, method: HttpMethod) -> Endpoint<R> {
    Endpoint::new(path, method).header("content-type", "application/json")
}

pub fn sections() -> Endpoint<Vec<SectionDTO>> {
    json_endpoint("api/v1/sections", HttpMethod::Get).query("sort", "id")
}

pub fn all_media() -> Endpoint<Vec<MediaDTO>> {
    json_endpoint("api/v1/media", HttpMethod::Get)
}

pub fn media(lookup: &MediaLookup) -> Endpoint<MediaDTO> {
    let endpoint = json_endpoint("api/v1/media", HttpMethod::Get);
    match lookup {
        MediaLookup::Slug(slug) => endpoint.query("slug", slug),
        MediaLookup::Id(id) => endpoint.query("id", id),
    }
}

/// Upcoming / news media; the caller supplies the filter query
/// (e.g. `isNewRelease=true`).
pub fn upcoming_media(query: &[(String, String)]) -> Endpoint<Vec<MediaDTO>> {
    let mut endpoint = json_endpoint("api/v1/media", HttpMethod::Get);
    for (key, value) in query {
        endpoint = endpoint.query(key, value);
    }
    endpoint
}

pub fn top_searched_media() -> Endpoint<Vec<MediaDTO>> {
    json_endpoint("api/v1/media", HttpMethod::Get)
        .query("timesSearched", "1")
        .query("limit", "20")
}

/// Regex search over slug and title with the same term.
pub fn search_media(term: &str) -> Endpoint<Vec<MediaDTO>> {
    json_endpoint("api/v1/media/search", HttpMethod::Get)
        .query("slug", term)
        .query("title", term)
}

pub fn season(slug: &str, number: i64) -> Endpoint<SeasonDTO> {
    json_endpoint("api/v1/seasons", HttpMethod::Get)
        .query("slug", slug)
        .query("season", number.to_string())
}

pub fn sign_up(body: &SignUpRequestDTO) -> Result<Endpoint<UserResponseDTO>, NetworkError> {
    json_endpoint("api/v1/users/signup", HttpMethod::Post).body_object(body)
}

pub fn sign_in(body: &SignInRequestDTO) -> Result<Endpoint<UserResponseDTO>, NetworkError> {
    json_endpoint("api/v1/users/signin", HttpMethod::Post).body_object(body)
}

pub fn sign_out() -> Endpoint<()> {
    json_endpoint("api/v1/users/signout", HttpMethod::Get)
}

pub fn profiles(user_id: &str) -> Endpoint<Vec<ProfileDTO>> {
    json_endpoint("api/v1/users/profiles", HttpMethod::Get).query("user", user_id)
}

pub fn create_profile(
    user_id: &str,
    body: &CreateProfileRequestDTO,
) -> Result<Endpoint<ProfileDTO>, NetworkError> {
    json_endpoint("api/v1/users/profiles", HttpMethod::Post)
        .query("user", user_id)
        .body_object(body)
}

pub fn update_user(
    email: &str,
    body: &UpdateUserRequestDTO,
) -> Result<Endpoint<UserResponseDTO>, NetworkError> {
    json_endpoint("api/v1/users/update-data", HttpMethod::Patch)
        .query("email", email)
        .body_object(body)
}

pub fn my_list(user_id: &str) -> Endpoint<MyListDTO> {
    json_endpoint("api/v1/mylists", HttpMethod::Get).query("user", user_id)
}

pub fn update_my_list(body: &MyListRequestDTO) -> Result<Endpoint<MyListDTO>, NetworkError> {
    json_endpoint("api/v1/mylists", HttpMethod::Patch).body_object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_network::config::ApiDataConfig;
    use core_network::endpoint::Requestable;
    use url::Url;

    fn config() -> ApiDataConfig {
        ApiDataConfig::new(Url::parse("https://api.example.com").unwrap())
    }

    #[test]
    fn test_sections_query_shape() {
        let request = sections().build_request(&config()).unwrap();
        assert_eq!(request.url, "https://api.example.com/api/v1/sections?sort=id");
        assert_eq!(request.method, HttpMethod::Get);
    }

    #[test]
    fn test_top_searched_query_shape() {
        let request = top_searched_media().build_request(&config()).unwrap();
        assert_eq!(
            request.url,
            "https://api.example.com/api/v1/media?timesSearched=1&limit=20"
        );
    }

    #[test]
    fn test_media_lookup_by_slug_and_id() {
        let by_slug = media(&MediaLookup::Slug("the-crown".to_string()))
            .build_request(&config())
            .unwrap();
        assert_eq!(
            by_slug.url,
            "https://api.example.com/api/v1/media?slug=the-crown"
        );

        let by_id = media(&MediaLookup::Id("42".to_string()))
            .build_request(&config())
            .unwrap();
        assert_eq!(by_id.url, "https://api.example.com/api/v1/media?id=42");
    }

    #[test]
    fn test_every_endpoint_carries_json_content_type() {
        let cfg = config();
        let body = SignInRequestDTO {
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
        };

        let requests = vec![
            sections().build_request(&cfg).unwrap(),
            all_media().build_request(&cfg).unwrap(),
            search_media("crown").build_request(&cfg).unwrap(),
            sign_in(&body).unwrap().build_request(&cfg).unwrap(),
            sign_out().build_request(&cfg).unwrap(),
            profiles("u1").build_request(&cfg).unwrap(),
            my_list("u1").build_request(&cfg).unwrap(),
        ];
        for request in requests {
            assert_eq!(
                request.headers.get("content-type").map(String::as_str),
                Some("application/json"),
                "missing content-type on {}",
                request.url
            );
        }
    }

    #[test]
    fn test_sign_in_posts_credentials_body() {
        let body = SignInRequestDTO {
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
        };
        let request = sign_in(&body).unwrap().build_request(&config()).unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.example.com/api/v1/users/signin");

        let json: serde_json::Value =
            serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["password"], "pw");
    }

    #[test]
    fn test_update_user_patch_shape() {
        let body = UpdateUserRequestDTO {
            name: Some("Ada".to_string()),
            selected_profile: Some("p1".to_string()),
        };
        let request = update_user("a@b.com", &body)
            .unwrap()
            .build_request(&config())
            .unwrap();
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(
            request.url,
            "https://api.example.com/api/v1/users/update-data?email=a%40b.com"
        );
        let json: serde_json::Value =
            serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(json["selectedProfile"], "p1");
    }

    #[test]
    fn test_sign_out_has_no_body() {
        let request = sign_out().build_request(&config()).unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_none());
    }
}
