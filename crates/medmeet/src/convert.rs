// ── API-to-domain conversions ──
//
// Bridges MedMeet DTOs into domain types and back for request bodies.
// Status strings parse into the closed enum; unknown values degrade to
// Unknown instead of failing the whole list.

use crate::api::types::{AppointmentDto, ClinicDto, PatientInfoDto, ServiceDto, SlotDto, UserDto};
use crate::model::{Appointment, AppointmentStatus, Clinic, PatientInfo, Service, Slot, User};

fn parse_status(raw: &str) -> AppointmentStatus {
    match raw {
        "PENDING" => AppointmentStatus::Pending,
        "CONFIRMED" => AppointmentStatus::Confirmed,
        "COMPLETED" => AppointmentStatus::Completed,
        "CANCELLED" => AppointmentStatus::Cancelled,
        _ => AppointmentStatus::Unknown,
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            id: dto.id,
            username: dto.username,
            full_name: dto.full_name,
            email: dto.email,
            phone_number: dto.phone_number,
            date_of_birth: dto.date_of_birth,
        }
    }
}

impl From<ClinicDto> for Clinic {
    fn from(dto: ClinicDto) -> Self {
        Clinic {
            id: dto.id,
            name: dto.name,
            address: dto.address,
            specialty: dto.specialty,
        }
    }
}

impl From<ServiceDto> for Service {
    fn from(dto: ServiceDto) -> Self {
        Service {
            id: dto.id,
            clinic_id: dto.clinic_id,
            name: dto.name,
            duration_minutes: dto.duration_minutes,
            price: dto.price,
        }
    }
}

impl From<SlotDto> for Slot {
    fn from(dto: SlotDto) -> Self {
        Slot {
            id: dto.id,
            service_id: dto.service_id,
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            available: dto.available,
        }
    }
}

impl From<AppointmentDto> for Appointment {
    fn from(dto: AppointmentDto) -> Self {
        Appointment {
            id: dto.id,
            clinic_name: dto.clinic_name,
            service_name: dto.service_name,
            starts_at: dto.starts_at,
            status: parse_status(&dto.status),
            patient_name: dto.patient_name,
        }
    }
}

impl From<PatientInfo> for PatientInfoDto {
    fn from(patient: PatientInfo) -> Self {
        PatientInfoDto {
            full_name: patient.full_name,
            phone_number: patient.phone_number,
            date_of_birth: patient.date_of_birth,
            note: patient.note,
        }
    }
}
