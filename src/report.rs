//! Serializable views of Rekognition responses.
//!
//! Detection output is mirrored field-for-field with the service's own
//! PascalCase names so callers see the vendor document unchanged. Comparison
//! output is reduced to rounded similarity/confidence pairs.

use aws_sdk_rekognition::operation::compare_faces::CompareFacesOutput;
use aws_sdk_rekognition::operation::detect_faces::DetectFacesOutput;
use aws_sdk_rekognition::operation::RequestId;
use aws_sdk_rekognition::types;
use serde::Serialize;

pub const NO_MATCH_MESSAGE: &str = "유사한 얼굴이 감지되지 않았습니다.";

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DetectionReport {
    pub face_details: Vec<FaceDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation_correction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseMetadata {
    pub request_id: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct FaceDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smile: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyeglasses: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunglasses: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beard: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mustache: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes_open: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouth_open: Option<Flag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emotions: Vec<Emotion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<Landmark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<Pose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_occluded: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_direction: Option<EyeDirection>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub left: Option<f32>,
    pub top: Option<f32>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AgeRange {
    pub low: Option<i32>,
    pub high: Option<i32>,
}

/// Boolean attribute with the service's confidence in it (smile, beard, ...).
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Flag {
    pub value: bool,
    pub confidence: Option<f32>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    pub value: Option<String>,
    pub confidence: Option<f32>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Emotion {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    pub confidence: Option<f32>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Landmark {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "X")]
    pub x: Option<f32>,
    #[serde(rename = "Y")]
    pub y: Option<f32>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Pose {
    pub roll: Option<f32>,
    pub yaw: Option<f32>,
    pub pitch: Option<f32>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Quality {
    pub brightness: Option<f32>,
    pub sharpness: Option<f32>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EyeDirection {
    pub yaw: Option<f32>,
    pub pitch: Option<f32>,
    pub confidence: Option<f32>,
}

fn flag(value: bool, confidence: Option<f32>) -> Flag {
    Flag { value, confidence }
}

impl From<&types::FaceDetail> for FaceDetail {
    fn from(face: &types::FaceDetail) -> Self {
        FaceDetail {
            bounding_box: face.bounding_box().map(|b| BoundingBox {
                width: b.width(),
                height: b.height(),
                left: b.left(),
                top: b.top(),
            }),
            age_range: face.age_range().map(|a| AgeRange {
                low: a.low(),
                high: a.high(),
            }),
            smile: face.smile().map(|s| flag(s.value(), s.confidence())),
            eyeglasses: face.eyeglasses().map(|e| flag(e.value(), e.confidence())),
            sunglasses: face.sunglasses().map(|s| flag(s.value(), s.confidence())),
            gender: face.gender().map(|g| Label {
                value: g.value().map(|v| v.as_str().to_string()),
                confidence: g.confidence(),
            }),
            beard: face.beard().map(|b| flag(b.value(), b.confidence())),
            mustache: face.mustache().map(|m| flag(m.value(), m.confidence())),
            eyes_open: face.eyes_open().map(|e| flag(e.value(), e.confidence())),
            mouth_open: face.mouth_open().map(|m| flag(m.value(), m.confidence())),
            emotions: face
                .emotions()
                .iter()
                .map(|e| Emotion {
                    kind: e.r#type().map(|t| t.as_str().to_string()),
                    confidence: e.confidence(),
                })
                .collect(),
            landmarks: face
                .landmarks()
                .iter()
                .map(|l| Landmark {
                    kind: l.r#type().map(|t| t.as_str().to_string()),
                    x: l.x(),
                    y: l.y(),
                })
                .collect(),
            pose: face.pose().map(|p| Pose {
                roll: p.roll(),
                yaw: p.yaw(),
                pitch: p.pitch(),
            }),
            quality: face.quality().map(|q| Quality {
                brightness: q.brightness(),
                sharpness: q.sharpness(),
            }),
            confidence: face.confidence(),
            face_occluded: face
                .face_occluded()
                .map(|o| flag(o.value(), o.confidence())),
            eye_direction: face.eye_direction().map(|d| EyeDirection {
                yaw: d.yaw(),
                pitch: d.pitch(),
                confidence: d.confidence(),
            }),
        }
    }
}

impl From<&DetectFacesOutput> for DetectionReport {
    fn from(output: &DetectFacesOutput) -> Self {
        DetectionReport {
            face_details: output.face_details().iter().map(FaceDetail::from).collect(),
            orientation_correction: output
                .orientation_correction()
                .map(|o| o.as_str().to_string()),
            response_metadata: output.request_id().map(|id| ResponseMetadata {
                request_id: id.to_string(),
            }),
        }
    }
}

/// Body of a successful comparison: either the matched pairs or a no-match notice.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ComparisonReport {
    Matches {
        #[serde(rename = "비교결과")]
        matches: Vec<FaceMatch>,
    },
    NoMatch {
        #[serde(rename = "결과")]
        message: &'static str,
    },
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FaceMatch {
    #[serde(rename = "유사도(%)")]
    pub similarity: f64,
    #[serde(rename = "신뢰도(%)")]
    pub confidence: f64,
}

/// Two-decimal rounding with ties going to the even digit.
pub fn round2(value: f32) -> f64 {
    // Exact: 24 significant bits times 100 stays within an f64 mantissa.
    let scaled = f64::from(value) * 100.0;
    scaled.round_ties_even() / 100.0
}

impl From<&CompareFacesOutput> for ComparisonReport {
    fn from(output: &CompareFacesOutput) -> Self {
        let matches: Vec<FaceMatch> = output
            .face_matches()
            .iter()
            .map(|m| FaceMatch {
                similarity: round2(m.similarity().unwrap_or_default()),
                confidence: round2(
                    m.face()
                        .and_then(|face| face.confidence())
                        .unwrap_or_default(),
                ),
            })
            .collect();
        if matches.is_empty() {
            ComparisonReport::NoMatch {
                message: NO_MATCH_MESSAGE,
            }
        } else {
            ComparisonReport::Matches { matches }
        }
    }
}
