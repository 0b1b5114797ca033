//! # 비즈니스 로직 모듈 (접근 제어 엔진)
//!
//! 누가 어떤 문서에 무엇을 할 수 있는지는 모두 여기서 결정합니다.
//! 라우트 핸들러는 이 모듈의 함수만 부르고, `db`를 직접 부르지 않습니다.
//!
//! - `access`: 접근 판정기와 요청 단위 판정 캐시
//! - `guard`: 쓰기 작업 직전의 권한 재확인
//! - `sharing`: 공개 범위 전환과 공유 링크
//! - `password`: 비밀번호 해싱, 공유 토큰 생성
//! - `documents` / `collaborators` / `comments` / `versions` / `users`: 작업별 진입점

pub mod access;
pub mod collaborators;
pub mod comments;
pub mod documents;
pub mod guard;
pub mod password;
pub mod sharing;
pub mod users;
pub mod versions;
