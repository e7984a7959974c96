use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogue entry as served by the myFlix API. Read-only from the
/// client's perspective; the wire format uses Mongo-style field names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "ImagePath", default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Genre,
    #[serde(rename = "Director")]
    pub director: Director,
    #[serde(rename = "Featured", default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Director {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Bio")]
    pub bio: String,
    #[serde(rename = "Birth", default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<DateTime<Utc>>,
    #[serde(rename = "Death", default, skip_serializing_if = "Option::is_none")]
    pub death: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserializes_wire_format() {
        let json = r#"{
            "_id": "m1",
            "Title": "Heat",
            "Description": "A thief plans one last score.",
            "ImagePath": "https://example.org/heat.png",
            "Genre": {"Name": "Crime", "Description": "Heists and cops."},
            "Director": {
                "Name": "Michael Mann",
                "Bio": "American film director.",
                "Birth": "1943-02-05T00:00:00.000Z"
            },
            "Featured": true
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, "m1");
        assert_eq!(movie.title, "Heat");
        assert_eq!(movie.genre.name, "Crime");
        assert_eq!(movie.director.name, "Michael Mann");
        assert!(movie.director.birth.is_some());
        assert!(movie.director.death.is_none());
        assert!(movie.featured);
    }

    #[test]
    fn test_movie_tolerates_missing_optionals() {
        let json = r#"{
            "_id": "m2",
            "Title": "Ronin",
            "Description": "A mercenary chase.",
            "Genre": {"Name": "Thriller", "Description": "Tension."},
            "Director": {"Name": "John Frankenheimer", "Bio": "Directs."}
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert!(movie.image_path.is_none());
        assert!(!movie.featured);
    }
}
